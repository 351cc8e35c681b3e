use rand::{distributions::Alphanumeric, thread_rng, Rng};

/// Random alphanumeric token for the password-reset handshake.
pub fn generate_reset_token(length: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
