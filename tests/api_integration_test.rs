// ==========================================
// ImportApi end-to-end tests
// ==========================================
// Target: file-backed store + stored settings + import/export cycle
// ==========================================

mod test_helpers;

use aid_registry::api::{ApiError, ImportApi};
use aid_registry::config::{config_keys, ConfigManager, ImportConfigReader};
use aid_registry::domain::{EntityKind, Guardian};
use aid_registry::repository::{BeneficiaryRepository, StoredRecord};
use aid_registry::logging;
use test_helpers::{areas, create_test_db, read_sheet, upload};

#[tokio::test]
async fn test_full_cycle_on_file_store() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().unwrap();

    let api = ImportApi::open(&db_path).unwrap();
    assert_eq!(api.upsert_areas(areas()).await.unwrap(), 2);

    // 1. guardians
    let guardians = upload(&[
        &["الاسم الرباعي", "رقم الهوية", "رقم الجوال", "المنطقة"],
        &["أحمد", "0400", "0599", "الشمال"],
        &["سالم", "0400", "", "الوسط"],
        &["محمود", "0402", "", "الوسط"],
    ]);
    let response = api.import_bytes(EntityKind::Guardians, &guardians).await.unwrap();
    assert_eq!(response.inserted, 2);
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].row, 3);

    // 2. aids reference the stored guardians
    let aids = upload(&[
        &["رقم هوية ولي الأمر", "نوع المساعدة", "تاريخ المساعدة"],
        &["0400", "نقد", "2024-05-01"],
        &["0999", "نقد", "2024-05-01"],
    ]);
    let response = api.import_bytes(EntityKind::Aids, &aids).await.unwrap();
    assert_eq!(response.inserted, 2);
    assert!(response.error_report.is_none());
    assert!(response.warning_report.is_some());

    // 3. export reflects the store
    let export = api.export(EntityKind::Aids).await.unwrap().render().unwrap();
    let rows = read_sheet(&export, EntityKind::Aids.label());
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][1], "أحمد");
    assert_eq!(rows[1][3], "الشمال");

    // reopening the same file sees the same data
    drop(api);
    let reopened = ImportApi::open(&db_path).unwrap();
    let stored: Vec<StoredRecord<Guardian>> = reopened
        .repository()
        .list_records(EntityKind::Guardians)
        .await
        .unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].record.national_id, "0400");
}

#[tokio::test]
async fn test_stored_settings_drive_defaults() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let api = ImportApi::open(&db_path).unwrap();
    api.upsert_areas(areas()).await.unwrap();

    let config = ConfigManager::new(&db_path).unwrap();
    config
        .set_global_config_value(config_keys::DEFAULT_COUNT, "2")
        .unwrap();
    config
        .set_global_config_value(config_keys::DEFAULT_GENDER, "أنثى")
        .unwrap();
    let loaded = config.load_import_config().await.unwrap();
    assert_eq!(loaded.default_count, 2);

    let guardians = upload(&[&["الاسم الرباعي", "رقم الهوية", "المنطقة"], &["هند", "0800", "الوسط"]]);
    api.import_bytes(EntityKind::Guardians, &guardians).await.unwrap();

    let stored: Vec<StoredRecord<Guardian>> = api
        .repository()
        .list_records(EntityKind::Guardians)
        .await
        .unwrap();
    let guardian = &stored[0].record;
    assert_eq!(guardian.wives_count, 2);
    assert_eq!(guardian.children_count, 2);
    assert_eq!(guardian.family_members_count, 5);
    assert_eq!(guardian.gender.label(), "أنثى");
}

#[tokio::test]
async fn test_import_without_areas_rejects_guardians() {
    let api = ImportApi::open(":memory:").unwrap();
    let guardians = upload(&[&["الاسم الرباعي", "رقم الهوية"], &["هند", "0800"]]);

    let response = api.import_bytes(EntityKind::Guardians, &guardians).await.unwrap();
    assert_eq!(response.inserted, 0);
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].field, "المنطقة");
}

#[tokio::test]
async fn test_unsupported_upload_extension() {
    let api = ImportApi::open(":memory:").unwrap();
    let err = api
        .import_file(EntityKind::Aids, std::path::Path::new("aids.csv"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ImportError(_)));
}
