use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::core::types::State;

pub trait FromRandom {
    fn from_random() -> Self;
}

impl FromRandom for State {
    fn from_random() -> Self {
        State(random_string(64))
    }
}

fn random_string(size: usize) -> String {
    use rand::Rng;

    let s: String = rand::thread_rng()
        .sample_iter(rand::distributions::Alphanumeric)
        .take(size)
        .map(|b| b as char)
        .collect();
    URL_SAFE_NO_PAD.encode(s)
}
