//! One-time import of the static region datasets plus the built-in demo
//! records, producing the registry's initial in-memory state.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::features::applications::models::{
    ApplicationRequest, ApplicationStatus, ApplicationType,
};
use crate::features::cooperatives::models::Cooperative;
use crate::features::regions::models::{City, Province, Subdistrict};
use crate::features::reports::models::{
    LoanReport, LoanStatus, SavingReport, SavingType,
};
use crate::features::users::models::{User, UserRole};

// Region datasets keyed by the Indonesian administrative code scheme
// (BPS-style numeric codes: province 2 digits, city 4, subdistrict 6).
const PROVINCES_JSON: &str = include_str!("../../data/provinces.json");
const KABUPATEN_JSON: &str = include_str!("../../data/kabupaten.json");
const KECAMATAN_JSON: &str = include_str!("../../data/kecamatan.json");

#[derive(Debug, Deserialize)]
struct NamedCode {
    id: String,
    nama: String,
}

#[derive(Debug, Deserialize)]
struct KabupatenGroup {
    id: i64,
    kabupaten: Vec<NamedCode>,
}

#[derive(Debug, Deserialize)]
struct KecamatanGroup {
    id: String,
    kecamatan: Vec<NamedCode>,
}

/// Everything the registry starts with.
pub struct SeedData {
    pub provinces: Vec<Province>,
    pub cities: Vec<City>,
    pub subdistricts: Vec<Subdistrict>,
    pub cooperatives: Vec<Cooperative>,
    pub users: Vec<User>,
    pub saving_reports: Vec<SavingReport>,
    pub loan_reports: Vec<LoanReport>,
    pub application_requests: Vec<ApplicationRequest>,
}

pub fn load() -> Result<SeedData, String> {
    Ok(SeedData {
        provinces: load_provinces()?,
        cities: load_cities()?,
        subdistricts: load_subdistricts()?,
        cooperatives: demo_cooperatives(),
        users: demo_users(),
        saving_reports: demo_saving_reports()?,
        loan_reports: demo_loan_reports()?,
        application_requests: demo_application_requests()?,
    })
}

fn parse_code(raw: &str) -> Result<i64, String> {
    raw.parse::<i64>()
        .map_err(|_| format!("Invalid region code '{}'", raw))
}

fn load_provinces() -> Result<Vec<Province>, String> {
    let entries: Vec<NamedCode> = serde_json::from_str(PROVINCES_JSON)
        .map_err(|e| format!("Failed to parse provinces.json: {}", e))?;

    entries
        .into_iter()
        .map(|p| {
            Ok(Province {
                id: parse_code(&p.id)?,
                name: p.nama,
            })
        })
        .collect()
}

fn load_cities() -> Result<Vec<City>, String> {
    let groups: Vec<KabupatenGroup> = serde_json::from_str(KABUPATEN_JSON)
        .map_err(|e| format!("Failed to parse kabupaten.json: {}", e))?;

    let mut cities = Vec::new();
    for group in groups {
        for city in group.kabupaten {
            cities.push(City {
                id: parse_code(&city.id)?,
                name: city.nama,
                province_id: group.id,
            });
        }
    }
    Ok(cities)
}

fn load_subdistricts() -> Result<Vec<Subdistrict>, String> {
    let groups: Vec<KecamatanGroup> = serde_json::from_str(KECAMATAN_JSON)
        .map_err(|e| format!("Failed to parse kecamatan.json: {}", e))?;

    let mut subdistricts = Vec::new();
    for group in groups {
        let city_id = parse_code(&group.id)?;
        for subdistrict in group.kecamatan {
            subdistricts.push(Subdistrict {
                id: parse_code(&subdistrict.id)?,
                name: subdistrict.nama,
                city_id,
            });
        }
    }
    Ok(subdistricts)
}

fn date(raw: &str) -> Result<NaiveDate, String> {
    raw.parse::<NaiveDate>()
        .map_err(|_| format!("Invalid seed date '{}'", raw))
}

fn demo_cooperatives() -> Vec<Cooperative> {
    let rows = [
        (1, "Koperasi Maju Bersama", 35, 3571, 357101),
        (2, "Koperasi Sejahtera", 31, 3171, 317101),
        (3, "Koperasi Makmur", 32, 3271, 327101),
        (4, "Koperasi Bina Usaha", 33, 3371, 337101),
        (5, "Koperasi Mandiri", 34, 3471, 347101),
    ];
    rows.into_iter()
        .map(|(id, name, province_id, city_id, subdistrict_id)| Cooperative {
            id,
            name: name.to_string(),
            province_id,
            city_id,
            subdistrict_id,
        })
        .collect()
}

fn demo_users() -> Vec<User> {
    let rows = [
        (1, "Admin User", "admin@example.com", "081234567890", UserRole::Admin),
        (2, "John Doe", "john@example.com", "081234567891", UserRole::User),
        (3, "Jane Smith", "jane@example.com", "081234567892", UserRole::User),
        (4, "Super Admin", "superadmin@example.com", "081234567893", UserRole::Admin),
        (5, "Regular User", "user@example.com", "081234567894", UserRole::User),
    ];
    rows.into_iter()
        .map(|(id, name, email, phone_number, role)| User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            phone_number: phone_number.to_string(),
            role,
        })
        .collect()
}

fn demo_saving_reports() -> Result<Vec<SavingReport>, String> {
    let rows = [
        (1, 1, 101, "Budi Santoso", 1_000_000, "2025-01-01", SavingType::Pokok),
        (2, 1, 102, "Siti Aminah", 500_000, "2025-01-05", SavingType::Wajib),
        (3, 2, 103, "Ahmad Fauzi", 750_000, "2025-01-10", SavingType::Pokok),
        (4, 3, 104, "Dewi Lestari", 200_000, "2025-01-15", SavingType::Wajib),
    ];
    rows.into_iter()
        .map(|(id, cooperative_id, user_id, full_name, amount, day, r#type)| {
            Ok(SavingReport {
                id,
                cooperative_id,
                user_id,
                full_name: full_name.to_string(),
                amount: Decimal::from(amount),
                date: date(day)?,
                r#type,
            })
        })
        .collect()
}

fn demo_loan_reports() -> Result<Vec<LoanReport>, String> {
    let rows = [
        (1, 1, 101, "Budi Santoso", 2_000_000, "2025-01-02", LoanStatus::Approved),
        (2, 2, 102, "Siti Aminah", 1_500_000, "2025-01-06", LoanStatus::Pending),
        (3, 3, 103, "Ahmad Fauzi", 1_000_000, "2025-01-12", LoanStatus::Rejected),
        (4, 1, 104, "Dewi Lestari", 500_000, "2025-01-18", LoanStatus::Approved),
    ];
    rows.into_iter()
        .map(|(id, cooperative_id, user_id, full_name, amount, day, status)| {
            Ok(LoanReport {
                id,
                cooperative_id,
                user_id,
                full_name: full_name.to_string(),
                amount: Decimal::from(amount),
                date: date(day)?,
                status,
            })
        })
        .collect()
}

fn demo_application_requests() -> Result<Vec<ApplicationRequest>, String> {
    Ok(vec![
        ApplicationRequest {
            id: 1,
            user_id: 101,
            full_name: None,
            cooperative_id: 1,
            amount: Decimal::from(1_000_000),
            date: date("2025-01-01")?,
            r#type: ApplicationType::Save,
            status: ApplicationStatus::Submitted,
        },
        ApplicationRequest {
            id: 2,
            user_id: 102,
            full_name: None,
            cooperative_id: 2,
            amount: Decimal::from(2_000_000),
            date: date("2025-01-05")?,
            r#type: ApplicationType::Borrow,
            status: ApplicationStatus::Approved,
        },
    ])
}
