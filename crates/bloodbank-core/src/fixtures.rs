//! In-memory mock dataset that seeds every session.

use crate::models::{
    Admin, BloodStock, BloodType, DonationCamp, Donor, HospitalRequest,
    HospitalStaff, MonthlyDonations, RequestStatus,
};

/// The signed-in donor.
pub fn donor() -> Donor {
    Donor {
        id: "donor-123".into(),
        name: "Jane Smith".into(),
        email: "jane.smith@example.com".into(),
        blood_type: BloodType::ONegative,
        total_donations: 8,
        last_donation_date: "January 15, 2024".into(),
        next_eligible_date: "March 11, 2024".into(),
        age: 25,
        phone: "234-567-8901".into(),
        address: "456 Oak Ave, Anytown".into(),
        donation_history: Vec::new(),
    }
}

pub fn admin() -> Admin {
    Admin {
        id: "admin-001".into(),
        name: "Admin Alex".into(),
        email: "alex@bbms.org".into(),
    }
}

pub fn hospital_staff() -> HospitalStaff {
    HospitalStaff {
        id: "hospital-777".into(),
        name: "Dr. Carter".into(),
        email: "carter@generalhospital.com".into(),
        hospital_name: "General Hospital".into(),
    }
}

/// Initial donor registry contents.
pub fn donors() -> Vec<Donor> {
    vec![
        donor(),
        Donor {
            id: "donor-2".into(),
            name: "John Doe".into(),
            email: "john@example.com".into(),
            blood_type: BloodType::APositive,
            total_donations: 12,
            last_donation_date: "Feb 10, 2024".into(),
            next_eligible_date: "April 6, 2024".into(),
            age: 34,
            phone: "123-456-7890".into(),
            address: "123 Main St".into(),
            donation_history: Vec::new(),
        },
        Donor {
            id: "donor-3".into(),
            name: "Peter Jones".into(),
            email: "peter@example.com".into(),
            blood_type: BloodType::BNegative,
            total_donations: 3,
            last_donation_date: "May 1, 2024".into(),
            next_eligible_date: "June 26, 2024".into(),
            age: 28,
            phone: "123-456-7890".into(),
            address: "123 Main St".into(),
            donation_history: Vec::new(),
        },
    ]
}

/// One record per blood type.
pub fn blood_stocks() -> Vec<BloodStock> {
    [35, 15, 28, 8, 12, 5, 45, 18]
        .into_iter()
        .zip(BloodType::ALL)
        .map(|(units, blood_type)| BloodStock::new(blood_type, units))
        .collect()
}

pub fn donation_camps() -> Vec<DonationCamp> {
    vec![
        DonationCamp {
            id: "camp-1".into(),
            name: "City Hall Community Drive".into(),
            date: "August 15, 2024".into(),
            time: "9:00 AM to 3:00 PM".into(),
        },
        DonationCamp {
            id: "camp-2".into(),
            name: "University Campus Blood Drive".into(),
            date: "September 5, 2024".into(),
            time: "10:00 AM to 4:00 PM".into(),
        },
    ]
}

pub fn hospital_requests() -> Vec<HospitalRequest> {
    let request = |id: &str, bt, units, date: &str, status, reason: &str, hospital: &str| {
        HospitalRequest {
            id: id.into(),
            blood_type: bt,
            units,
            date: date.into(),
            status,
            reason: Some(reason.into()),
            hospital: Some(hospital.into()),
        }
    };

    vec![
        request("req-1", BloodType::APositive, 5, "2024-07-20", RequestStatus::Pending,
            "Emergency surgery for trauma patient", "General Hospital"),
        request("req-2", BloodType::ONegative, 10, "2024-07-18", RequestStatus::Approved,
            "Scheduled transfusion", "Mercy Hospital"),
        request("req-3", BloodType::BPositive, 3, "2024-07-21", RequestStatus::Pending,
            "Emergency surgery", "City Central"),
        request("req-4", BloodType::AbNegative, 2, "2024-07-15", RequestStatus::Rejected,
            "Stock unavailable", "General Hospital"),
    ]
}

pub fn monthly_donations() -> Vec<MonthlyDonations> {
    [("Jan", 40), ("Feb", 30), ("Mar", 52), ("Apr", 45), ("May", 80), ("Jun", 60), ("Jul", 75)]
        .into_iter()
        .map(|(month, donations)| MonthlyDonations {
            month: month.into(),
            donations,
        })
        .collect()
}
