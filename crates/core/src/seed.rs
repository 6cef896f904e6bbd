//! First-run seed document.
//!
//! One account per role, a couple of donors owned by the `user` account, a pending request
//! raised by the `doctor` account, one donation and two inventory rows. Seed passwords are
//! run through the store's credential verifier so they are stored like any other account.
//!
//! | username     | password    | role       |
//! |--------------|-------------|------------|
//! | `admin`      | `admin123`  | admin      |
//! | `user`       | `user123`   | user       |
//! | `doctor`     | `doctor123` | doctor     |
//! | `government` | `gov123`    | government |

use crate::credentials::CredentialVerifier;
use crate::document::Document;
use crate::models::{
    Donation, Donor, DonorStatus, InventoryRecord, Request, RequestStatus, Role, User,
    UserStatus,
};
use crate::BankResult;
use bloodbank_types::BloodType;
use chrono::{DateTime, Duration, NaiveDate, Utc};

fn seed_date(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    // only called with literal calendar dates
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("seed dates are valid calendar dates")
        .and_utc()
}

struct SeedAccount {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    username: &'static str,
    password: &'static str,
    role: Role,
    department: &'static str,
    created_at: DateTime<Utc>,
    last_login_hours_ago: i64,
    login_count: u64,
}

fn seed_accounts() -> [SeedAccount; 4] {
    [
        SeedAccount {
            id: "admin-001",
            name: "System Administrator",
            email: "admin@blooddomain.com",
            username: "admin",
            password: "admin123",
            role: Role::Admin,
            department: "System Administration",
            created_at: seed_date(2024, 1, 1, 0, 0),
            last_login_hours_ago: 0,
            login_count: 156,
        },
        SeedAccount {
            id: "user-001",
            name: "Dr. Zhang",
            email: "zhang@hospital.com",
            username: "user",
            password: "user123",
            role: Role::User,
            department: "Haematology",
            created_at: seed_date(2024, 2, 15, 0, 0),
            last_login_hours_ago: 2,
            login_count: 89,
        },
        SeedAccount {
            id: "user-002",
            name: "Dr. Li",
            email: "li@hospital.com",
            username: "doctor",
            password: "doctor123",
            role: Role::Doctor,
            department: "Transfusion Medicine",
            created_at: seed_date(2024, 3, 10, 0, 0),
            last_login_hours_ago: 24,
            login_count: 67,
        },
        SeedAccount {
            id: "gov-001",
            name: "Director Wang",
            email: "wang@health.gov.cn",
            username: "government",
            password: "gov123",
            role: Role::Government,
            department: "Health Commission",
            created_at: seed_date(2024, 1, 15, 0, 0),
            last_login_hours_ago: 4,
            login_count: 124,
        },
    ]
}

/// Build the seed document, hashing account passwords with `credentials`.
pub fn seed_document(credentials: &dyn CredentialVerifier) -> BankResult<Document> {
    let now = Utc::now();

    let users = seed_accounts()
        .into_iter()
        .map(|acc| {
            Ok(User {
                id: acc.id.into(),
                name: acc.name.into(),
                email: acc.email.into(),
                username: acc.username.into(),
                credential: credentials.hash(acc.password)?,
                role: acc.role,
                department: acc.department.into(),
                status: UserStatus::Active,
                permissions: acc
                    .role
                    .default_permissions()
                    .iter()
                    .map(|p| p.to_string())
                    .collect(),
                created_at: acc.created_at,
                last_login: Some(now - Duration::hours(acc.last_login_hours_ago)),
                login_count: acc.login_count,
            })
        })
        .collect::<BankResult<Vec<_>>>()?;

    let donors = vec![
        Donor {
            id: "donor-001".into(),
            name: "Wang Xiaoming".into(),
            blood_type: BloodType::APositive,
            phone: "13800138001".into(),
            id_card: "110101199001011234".into(),
            address: "Chaoyang District, Beijing".into(),
            status: DonorStatus::Active,
            last_donation: Some(seed_date(2024, 6, 15, 0, 0)),
            total_donations: 12,
            notes: "Regular donor, good health".into(),
            created_by: "user-001".into(),
            created_at: seed_date(2024, 2, 20, 9, 0),
        },
        Donor {
            id: "donor-002".into(),
            name: "Li Xiaohong".into(),
            blood_type: BloodType::OPositive,
            phone: "13800138002".into(),
            id_card: "110101199002022345".into(),
            address: "Haidian District, Beijing".into(),
            status: DonorStatus::Active,
            last_donation: Some(seed_date(2024, 5, 20, 0, 0)),
            total_donations: 8,
            notes: "First-time donor".into(),
            created_by: "user-001".into(),
            created_at: seed_date(2024, 3, 2, 14, 30),
        },
    ];

    let requests = vec![Request {
        id: "REQ-2024-001".into(),
        patient_name: "Zhang San".into(),
        patient_age: Some(45),
        blood_type: BloodType::APositive,
        amount: 400,
        urgency: "urgent".into(),
        status: RequestStatus::Pending,
        diagnosis: "Gastric bleeding".into(),
        surgery_type: "Emergency surgery".into(),
        notes: "Patient is critical, transfusion needed as soon as possible".into(),
        doctor_name: "Dr. Li".into(),
        created_by: "user-002".into(),
        created_at: seed_date(2024, 6, 20, 10, 30),
        processed_at: None,
        processed_by: None,
    }];

    let donations = vec![Donation {
        id: "donation-001".into(),
        donor_id: "donor-001".into(),
        donor_name: "Wang Xiaoming".into(),
        blood_type: Some(BloodType::APositive),
        amount: 200,
        donation_type: "whole".into(),
        health_status: "good".into(),
        notes: "Good health".into(),
        donation_date: seed_date(2024, 6, 15, 0, 0),
        recorded_by: "user-001".into(),
    }];

    let inventory = vec![
        InventoryRecord {
            id: "inv-001".into(),
            blood_type: BloodType::APositive,
            amount: 1250,
            capacity: 2000,
            unit: "ml".into(),
            last_updated: now,
            status: "normal".into(),
        },
        InventoryRecord {
            id: "inv-002".into(),
            blood_type: BloodType::OPositive,
            amount: 1890,
            capacity: 2000,
            unit: "ml".into(),
            last_updated: now,
            status: "normal".into(),
        },
    ];

    Ok(Document {
        users,
        donors,
        requests,
        donations,
        inventory,
    })
}
