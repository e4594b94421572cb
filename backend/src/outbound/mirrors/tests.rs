//! Tests for the file mirror store.

use super::*;
use rstest::{fixture, rstest};
use rust_decimal::Decimal;
use tempfile::TempDir;

struct MirrorDir {
    _temp: TempDir,
    store: FileMirrorStore,
    files: Dir,
}

#[fixture]
fn mirror_dir() -> MirrorDir {
    let temp = TempDir::new().expect("temp dir");
    let root = temp.path().join("datos");
    let root = camino::Utf8PathBuf::from_path_buf(root).expect("utf8 temp path");
    let store = FileMirrorStore::open(&root).expect("open mirror dir");
    let files = Dir::open_ambient_dir(&root, ambient_authority()).expect("mirror root");
    MirrorDir {
        _temp: temp,
        store,
        files,
    }
}

fn record(name: &str, quantity: i64, price: Decimal) -> MirrorRecord {
    MirrorRecord {
        timestamp: "2024-05-01T12:30:00".to_owned(),
        name: name.to_owned(),
        quantity,
        unit_price: price,
    }
}

#[rstest]
#[case(MirrorFormat::Txt)]
#[case(MirrorFormat::Json)]
#[case(MirrorFormat::Csv)]
#[tokio::test]
async fn missing_files_read_as_empty(mirror_dir: MirrorDir, #[case] format: MirrorFormat) {
    let readout = mirror_dir.store.read_all(format).await.expect("read");
    assert_eq!(readout, MirrorReadout::default());
}

#[rstest]
#[case(MirrorFormat::Txt)]
#[case(MirrorFormat::Json)]
#[case(MirrorFormat::Csv)]
#[tokio::test]
async fn appended_records_read_back_in_order(
    mirror_dir: MirrorDir,
    #[case] format: MirrorFormat,
) {
    let first = record("Pan", 3, Decimal::new(25, 1));
    let second = record("Leche", 2, Decimal::new(34, 1));
    mirror_dir.store.append(format, &first).await.expect("append");
    mirror_dir.store.append(format, &second).await.expect("append");

    let readout = mirror_dir.store.read_all(format).await.expect("read");
    assert_eq!(readout.records, vec![first, second]);
    assert_eq!(readout.skipped, 0);
}

#[rstest]
#[tokio::test]
async fn txt_mirror_is_line_per_record(mirror_dir: MirrorDir) {
    mirror_dir
        .store
        .append(MirrorFormat::Txt, &record("Pan", 3, Decimal::new(25, 1)))
        .await
        .expect("append");
    let contents = mirror_dir.files.read_to_string("datos.txt").expect("read");
    assert_eq!(contents, "2024-05-01T12:30:00 | Pan | 3 | 2.50\n");
}

#[rstest]
#[tokio::test]
async fn txt_names_with_separators_are_saved_importable(mirror_dir: MirrorDir) {
    for name in ["Pan|Integral", "Pan\nDulce"] {
        mirror_dir
            .store
            .append(MirrorFormat::Txt, &record(name, 1, Decimal::ONE))
            .await
            .expect("append");
    }

    let readout = mirror_dir.store.read_all(MirrorFormat::Txt).await.expect("read");
    let names: Vec<_> = readout.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Pan Integral", "Pan Dulce"]);
    assert_eq!(readout.skipped, 0);
}

#[rstest]
#[tokio::test]
async fn csv_header_is_written_once(mirror_dir: MirrorDir) {
    for name in ["Azucar", "Sal"] {
        mirror_dir
            .store
            .append(MirrorFormat::Csv, &record(name, 5, Decimal::new(42, 1)))
            .await
            .expect("append");
    }
    let contents = mirror_dir.files.read_to_string("datos.csv").expect("read");
    assert_eq!(contents.matches("fecha,nombre,cantidad,precio").count(), 1);
    assert_eq!(contents.lines().count(), 3);
}

#[rstest]
#[tokio::test]
async fn csv_header_is_written_into_empty_file(mirror_dir: MirrorDir) {
    mirror_dir.files.write("datos.csv", "").expect("seed empty");
    mirror_dir
        .store
        .append(MirrorFormat::Csv, &record("Azucar", 5, Decimal::new(42, 1)))
        .await
        .expect("append");
    let contents = mirror_dir.files.read_to_string("datos.csv").expect("read");
    assert!(contents.starts_with("fecha,nombre,cantidad,precio\n"));
}

#[rstest]
#[tokio::test]
async fn corrupt_json_reads_empty_and_is_replaced_on_append(mirror_dir: MirrorDir) {
    mirror_dir
        .files
        .write("datos.json", "{ not json")
        .expect("seed corrupt");

    let readout = mirror_dir
        .store
        .read_all(MirrorFormat::Json)
        .await
        .expect("lenient read");
    assert!(readout.records.is_empty());

    let saved = record("Leche", 2, Decimal::new(34, 1));
    mirror_dir
        .store
        .append(MirrorFormat::Json, &saved)
        .await
        .expect("append");
    let readout = mirror_dir
        .store
        .read_all(MirrorFormat::Json)
        .await
        .expect("read");
    assert_eq!(readout.records, vec![saved]);
}

#[rstest]
#[tokio::test]
async fn json_append_keeps_unrecognised_elements(mirror_dir: MirrorDir) {
    mirror_dir
        .files
        .write("datos.json", r#"[{"nota": "manual"}]"#)
        .expect("seed");
    mirror_dir
        .store
        .append(MirrorFormat::Json, &record("Pan", 1, Decimal::ONE))
        .await
        .expect("append");

    let readout = mirror_dir
        .store
        .read_all(MirrorFormat::Json)
        .await
        .expect("read");
    assert_eq!(readout.records.len(), 1);
    assert_eq!(readout.skipped, 1);
}

#[rstest]
#[tokio::test]
async fn txt_mirror_with_one_short_line_reports_three_records(mirror_dir: MirrorDir) {
    mirror_dir
        .files
        .write(
            "datos.txt",
            "2024-05-01T12:30:00 | Pan | 3 | 2.50\n\
             2024-05-01T12:31:00 | Leche | 2\n\
             2024-05-01T12:32:00 | Azucar | 5 | 4.20\n\
             2024-05-01T12:33:00 | Sal | 1 | 0.80\n",
        )
        .expect("seed");
    let readout = mirror_dir
        .store
        .read_all(MirrorFormat::Txt)
        .await
        .expect("read");
    assert_eq!(readout.records.len(), 3);
    assert_eq!(readout.skipped, 1);
}

#[rstest]
#[tokio::test]
async fn unreadable_csv_header_reads_as_empty(mirror_dir: MirrorDir) {
    mirror_dir
        .files
        .write("datos.csv", "a,b\n1,2\n")
        .expect("seed");
    let readout = mirror_dir
        .store
        .read_all(MirrorFormat::Csv)
        .await
        .expect("read");
    assert_eq!(readout, MirrorReadout::default());
}
