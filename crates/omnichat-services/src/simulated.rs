//! Simulated chat replies. No model is called.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(600);

pub const SIMULATED_RESPONSES: [&str; 6] = [
    "I'm just a simulated interface.",
    "That's interesting!",
    "Functionality not available in simulator mode.",
    "Please check the settings to clone a UI.",
    "System operating normally.",
    "Processing request...",
];

/// Pick one canned response
pub fn pick_response<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    SIMULATED_RESPONSES
        .choose(rng)
        .copied()
        .unwrap_or(SIMULATED_RESPONSES[0])
}

/// Wait `delay`, then return a canned response
pub async fn simulated_reply(delay: Duration) -> String {
    tokio::time::sleep(delay).await;
    pick_response(&mut rand::thread_rng()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_response_is_from_fixed_set() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert!(SIMULATED_RESPONSES.contains(&pick_response(&mut rng)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_reply_waits_for_delay() {
        let start = tokio::time::Instant::now();
        let reply = simulated_reply(DEFAULT_REPLY_DELAY).await;
        assert!(start.elapsed() >= DEFAULT_REPLY_DELAY);
        assert!(SIMULATED_RESPONSES.contains(&reply.as_str()));
    }
}
