///
/// Passwords that are rejected outright when the common-password check is enabled.
///
/// Matching is exact and case-insensitive - containment is handled separately by
/// the forbidden-word rule.
///
pub const COMMON_PASSWORDS: &[&str] = &[
    "password123", "12345678",  "qwerty123",   "admin123",
    "welcome123",  "letmein123", "monkey123",  "dragon123",
    "baseball123", "football123", "shadow123", "michael123",
    "jennifer123", "thomas123",  "jessica123", "joshua123",
    "michelle123", "charlie123", "andrew123",  "matthew123",
    "password1",   "123456789",  "qwerty",     "admin",
    "welcome",     "letmein",    "monkey",     "dragon",
    "baseball",    "football",   "shadow",     "michael",
    "jennifer",    "thomas",     "jessica",    "joshua",
    "michelle",    "charlie",    "andrew",     "matthew",
];
