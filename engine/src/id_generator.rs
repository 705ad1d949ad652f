use crate::games::SessionRng;
use crate::identifiers::SessionId;

const ADJECTIVES: &[&str] = &[
    "swift", "brave", "clever", "mighty", "silent", "golden", "wild", "noble",
    "fierce", "gentle", "quick", "wise", "bold", "proud", "cunning", "sly",
];

const NOUNS: &[&str] = &[
    "falcon", "bear", "tiger", "wolf", "eagle", "dragon", "lion", "panther",
    "hawk", "fox", "raven", "cobra", "shark", "phoenix", "lynx", "viper",
];

/// Readable session id such as `brave-lynx-0412`. Uniqueness is the caller's
/// concern; `SessionHost` retries on collision.
pub fn generate_session_id(rng: &mut SessionRng) -> SessionId {
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    let suffix: u16 = rng.random_range(0..10_000);
    SessionId::new(format!("{}-{}-{:04}", adjective, noun, suffix))
}
