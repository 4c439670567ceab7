pub mod password;
pub mod policy;

pub use password::{Argon2Hasher, PasswordHasher};
pub use policy::{PasswordPolicy, PasswordRules};
