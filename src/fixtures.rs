//! Credential fixtures
//!
//! Identity payloads used by the workflow chains: the fixed administrative
//! account the service is pre-seeded with, and synthetic user records
//! generated fresh for each add-user attempt.

use serde::Serialize;

/// Email of the pre-seeded administrative account.
pub const ADMIN_EMAIL: &str = "admin@example.com";

/// Password of the pre-seeded administrative account.
pub const ADMIN_PASSWORD: &str = "verysecret";

/// Placeholder password assigned to every generated user.
pub const TEST_PASSWORD: &str = "changeme123";

/// Domain generated user emails are derived under.
pub const TEST_DOMAIN: &str = "example.com";

/// A sign-in identity
#[derive(Debug, Clone, Serialize)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

/// A full user record as the add-user endpoint expects it
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// The fixed administrative identity.
pub fn admin_credential() -> Credential {
    Credential {
        email: ADMIN_EMAIL.to_string(),
        password: ADMIN_PASSWORD.to_string(),
    }
}

const FIRST_NAMES: &[&str] = &[
    "Ada", "Brian", "Carol", "Dennis", "Edith", "Frank", "Grace", "Hal",
    "Irene", "John", "Kate", "Leslie", "Margaret", "Niklaus", "Olga", "Pat",
];

const LAST_NAMES: &[&str] = &[
    "Archer", "Baker", "Carter", "Dawson", "Ellis", "Foster", "Glover",
    "Harper", "Irving", "Jensen", "Keller", "Lamont", "Mercer", "Norris",
];

fn random_bytes(n: usize) -> Vec<u8> {
    let mut buf = vec![0u8; n];
    getrandom::getrandom(&mut buf).expect("OS randomness unavailable");
    buf
}

fn hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02x}", b)).collect()
}

/// A fresh synthetic user: randomized first/last name, email derived as
/// `lowercase(first).lowercase(last)@example.com`, fixed test password.
///
/// The hex suffix on the last name keeps emails collision-resistant within a
/// single run; uniqueness beyond the run is not needed since every
/// invocation generates its own records.
pub fn generate_user() -> NewUser {
    let r = random_bytes(4);
    let first = FIRST_NAMES[r[0] as usize % FIRST_NAMES.len()].to_string();
    let last = format!(
        "{}{}",
        LAST_NAMES[r[1] as usize % LAST_NAMES.len()],
        hex(&r[2..4])
    );
    let email = format!(
        "{}.{}@{}",
        first.to_lowercase(),
        last.to_lowercase(),
        TEST_DOMAIN
    );
    NewUser {
        email,
        first_name: first,
        last_name: last,
        password: TEST_PASSWORD.to_string(),
    }
}

/// A user record whose email collides with the admin account, used to drive
/// the duplicate add-user conflict chain.
pub fn colliding_user() -> NewUser {
    NewUser {
        email: ADMIN_EMAIL.to_string(),
        first_name: "Admin".to_string(),
        last_name: "Clone".to_string(),
        password: TEST_PASSWORD.to_string(),
    }
}

/// A 1x1 transparent PNG, used as the default avatar upload payload.
pub const AVATAR_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d,
    0x49, 0x48, 0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01,
    0x08, 0x06, 0x00, 0x00, 0x00, 0x1f, 0x15, 0xc4, 0x89, 0x00, 0x00, 0x00,
    0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0xda, 0x63, 0x64, 0x60, 0xf8, 0x5f,
    0x0f, 0x00, 0x02, 0x87, 0x01, 0x80, 0xeb, 0x47, 0xba, 0x92, 0x00, 0x00,
    0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];
