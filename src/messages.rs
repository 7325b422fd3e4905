use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

const BUILTIN_MESSAGES: [&str; 5] = [
    "💧 Time to drink some water! Staying hydrated matters~",
    "🚰 Water break! Take a moment and have a glass",
    "🌊 Your body needs water, go grab a glass!",
    "💦 Long hours at the desk? Don't forget to hydrate, have some water now",
    "🥤 Ding! Your water reminder has arrived",
];

/// Typing this as the custom message drops the override.
pub const RESET_SENTINEL: &str = "reset";

pub struct MessagePool {
    messages: Vec<String>,
    custom: Option<String>,
    rng: StdRng,
}

impl MessagePool {
    pub fn new(messages: Option<Vec<String>>) -> Self {
        Self::with_rng(messages, StdRng::from_os_rng())
    }

    #[cfg(test)]
    pub fn with_seed(messages: Option<Vec<String>>, seed: u64) -> Self {
        Self::with_rng(messages, StdRng::seed_from_u64(seed))
    }

    fn with_rng(messages: Option<Vec<String>>, rng: StdRng) -> Self {
        let messages = match messages {
            Some(list) if !list.is_empty() => list,
            _ => BUILTIN_MESSAGES.iter().map(|m| m.to_string()).collect(),
        };

        Self {
            messages,
            custom: None,
            rng,
        }
    }

    /// The override verbatim when set, otherwise a uniformly random pool entry.
    pub fn pick(&mut self) -> String {
        if let Some(custom) = &self.custom {
            return custom.clone();
        }

        // the pool is never empty, see with_rng
        self.messages
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_custom(&mut self, text: Option<String>) {
        self.custom = text;
    }

    pub fn custom(&self) -> Option<&str> {
        self.custom.as_deref()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_pool_has_five_messages() {
        let pool = MessagePool::with_seed(None, 1);
        assert_eq!(pool.messages().len(), 5);
    }

    #[test]
    fn test_empty_override_list_falls_back_to_builtins() {
        let pool = MessagePool::with_seed(Some(Vec::new()), 1);
        assert_eq!(pool.messages().len(), 5);
    }

    #[test]
    fn test_pick_comes_from_pool() {
        let mut pool = MessagePool::with_seed(None, 7);
        for _ in 0..50 {
            let msg = pool.pick();
            assert!(pool.messages().contains(&msg));
        }
    }

    #[test]
    fn test_same_seed_gives_same_sequence() {
        let mut a = MessagePool::with_seed(None, 42);
        let mut b = MessagePool::with_seed(None, 42);
        let seq_a: Vec<String> = (0..20).map(|_| a.pick()).collect();
        let seq_b: Vec<String> = (0..20).map(|_| b.pick()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_pick_eventually_covers_pool() {
        let mut pool = MessagePool::with_seed(None, 3);
        let seen: HashSet<String> = (0..500).map(|_| pool.pick()).collect();
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_custom_override_returned_verbatim() {
        let mut pool = MessagePool::with_seed(None, 3);
        pool.set_custom(Some("stand up and stretch".to_string()));
        for _ in 0..10 {
            assert_eq!(pool.pick(), "stand up and stretch");
        }

        pool.set_custom(None);
        let msg = pool.pick();
        assert!(pool.messages().contains(&msg));
    }

    #[test]
    fn test_configured_pool_replaces_builtins() {
        let mut pool = MessagePool::with_seed(Some(vec!["only one".to_string()]), 9);
        assert_eq!(pool.pick(), "only one");
    }
}
