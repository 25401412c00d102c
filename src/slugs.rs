use rand::Rng;

/// Length of generated slugs when none is configured.
pub const DEFAULT_SLUG_LENGTH: usize = 7;

/// Longest slug a visitor may request.
pub const MAX_REQUESTED_LEN: usize = 64;

/// Paths served by the router itself; never usable as a slug.
pub const RESERVED: &[&str] = &["new", "info", "health"];

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a random alphanumeric slug of the given length.
///
/// Nothing here checks for collisions; the UNIQUE constraint on `url.slug`
/// is the only guard.
pub fn random(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Check a visitor-supplied slug, returning a message describing the problem.
pub fn validate_requested(slug: &str) -> Result<(), &'static str> {
    if slug.len() > MAX_REQUESTED_LEN {
        return Err("Requested short url is too long.");
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err("Requested short url may only contain letters, numbers, '-' and '_'.");
    }
    if RESERVED.contains(&slug) {
        return Err("Requested short url is reserved.");
    }
    Ok(())
}
