//! End-to-end tests through the exported session object.

use bloodbank_core::{open_blood_bank, BloodBankError, FfiDonorFilter, FfiNewDonor};

fn all_donors() -> FfiDonorFilter {
    FfiDonorFilter {
        blood_type: None,
        name_query: String::new(),
        age_range: "all".into(),
    }
}

fn new_donor(name: &str, age: u32, last_donation: &str) -> FfiNewDonor {
    FfiNewDonor {
        name: name.into(),
        email: "a@x.com".into(),
        blood_type: "AB+".into(),
        last_donation_date: last_donation.into(),
        age,
        phone: String::new(),
        address: String::new(),
    }
}

#[test]
fn test_admin_flow() {
    let core = open_blood_bank();
    assert_eq!(core.login("ADMIN".into()).unwrap(), "Admin Alex");
    core.navigate("donors".into()).unwrap();
    assert_eq!(core.active_view().unwrap(), "donors");

    let created = core.create_donor(new_donor("Zed", 18, "")).unwrap();
    assert_eq!(created.total_donations, 0);
    assert_eq!(created.blood_type, "AB+");

    let listed = core.list_donors(all_donors()).unwrap();
    assert_eq!(listed.len(), 4);

    assert_eq!(core.request_name_sort().unwrap(), "asc");
    let asc = core.list_donors(all_donors()).unwrap();
    assert_eq!(asc.last().unwrap().name, "Zed");

    assert_eq!(core.request_name_sort().unwrap(), "desc");
    let desc = core.list_donors(all_donors()).unwrap();
    assert_eq!(desc.first().unwrap().name, "Zed");
}

#[test]
fn test_create_rejects_minor() {
    let core = open_blood_bank();
    let err = core.create_donor(new_donor("Kid", 17, "")).unwrap_err();
    assert!(matches!(err, BloodBankError::Validation(_)));
    assert_eq!(core.list_donors(all_donors()).unwrap().len(), 3);

    let created = core.create_donor(new_donor("Adult", 40, "2024-06-01")).unwrap();
    assert_eq!(created.total_donations, 1);
}

#[test]
fn test_update_donor() {
    let core = open_blood_bank();
    let mut john = core
        .list_donors(FfiDonorFilter {
            blood_type: Some("A+".into()),
            name_query: "john".into(),
            age_range: "26-40".into(),
        })
        .unwrap()
        .pop()
        .unwrap();
    john.age = 45;
    core.update_donor(john).unwrap();

    let seniors = core
        .list_donors(FfiDonorFilter {
            blood_type: None,
            name_query: String::new(),
            age_range: "41+".into(),
        })
        .unwrap();
    assert_eq!(seniors.len(), 1);
    assert_eq!(seniors[0].id, "donor-2");
}

#[test]
fn test_update_rejects_bad_blood_type() {
    let core = open_blood_bank();
    let mut donor = core.list_donors(all_donors()).unwrap().remove(0);
    donor.blood_type = "Z+".into();
    assert!(matches!(
        core.update_donor(donor),
        Err(BloodBankError::InvalidInput(_))
    ));
}

#[test]
fn test_stock_update_is_isolated() {
    let core = open_blood_bank();
    let updated = core.set_stock_units("O-".into(), "25".into()).unwrap();
    assert_eq!(updated.units, 25);

    let stocks = core.list_stock(String::new()).unwrap();
    let units = |label: &str| stocks.iter().find(|s| s.blood_type == label).unwrap().units;
    assert_eq!(units("O-"), 25);
    assert_eq!(units("A+"), 35);
    assert_eq!(units("B-"), 8);

    let coerced = core.set_stock_units("B-".into(), "-3".into()).unwrap();
    assert_eq!(coerced.units, 0);
    assert_eq!(coerced.level, "Critical");
}

#[test]
fn test_screen_json_follows_role() {
    let core = open_blood_bank();
    let json: serde_json::Value = serde_json::from_str(&core.current_screen_json().unwrap()).unwrap();
    assert_eq!(json["screen"], "login");

    core.login("HOSPITAL".into()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&core.current_screen_json().unwrap()).unwrap();
    assert_eq!(json["screen"], "hospitalDashboard");
    assert_eq!(json["data"]["requests"].as_array().unwrap().len(), 2);

    // Admin-only view falls back to the hospital dashboard
    core.navigate("inventory".into()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&core.current_screen_json().unwrap()).unwrap();
    assert_eq!(json["screen"], "hospitalDashboard");

    core.logout().unwrap();
    core.login("DONOR".into()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&core.current_screen_json().unwrap()).unwrap();
    assert_eq!(json["screen"], "donorDashboard");
    assert_eq!(json["data"]["lives_saved"], 24);
}

#[test]
fn test_invalid_inputs() {
    let core = open_blood_bank();
    assert!(matches!(core.login("NURSE".into()), Err(BloodBankError::InvalidInput(_))));
    assert!(matches!(core.navigate("settings".into()), Err(BloodBankError::InvalidInput(_))));
    assert!(core.set_stock_units("Q".into(), "1".into()).is_err());
    assert!(core
        .list_donors(FfiDonorFilter {
            blood_type: None,
            name_query: String::new(),
            age_range: "90+".into(),
        })
        .is_err());
}
