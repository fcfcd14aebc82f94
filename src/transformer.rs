use std::sync::Arc;

use log::debug;
use rustc_hash::FxHashMap;

use crate::{token, FromToken, Token};

/// A rule maps a token to an output unit.
/// Rules are shared, so one rule can be installed for many token types.
pub type Rule<O> = Arc<dyn Fn(&Token<'_>) -> O + Send + Sync>;

/// The token types a rule is installed for, either a single type or a list of types.
pub trait RuleKeys {
    /// Returns the token types.
    fn into_keys(self) -> Vec<String>;
}

impl RuleKeys for &str {
    fn into_keys(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl RuleKeys for String {
    fn into_keys(self) -> Vec<String> {
        vec![self]
    }
}

impl RuleKeys for &[&str] {
    fn into_keys(self) -> Vec<String> {
        self.iter().map(|k| k.to_string()).collect()
    }
}

impl<const N: usize> RuleKeys for [&str; N] {
    fn into_keys(self) -> Vec<String> {
        self.iter().map(|k| k.to_string()).collect()
    }
}

impl<const N: usize> RuleKeys for &[&str; N] {
    fn into_keys(self) -> Vec<String> {
        self.iter().map(|k| k.to_string()).collect()
    }
}

impl RuleKeys for Vec<&str> {
    fn into_keys(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

impl RuleKeys for Vec<String> {
    fn into_keys(self) -> Vec<String> {
        self
    }
}

/// A table of rules keyed by token type.
///
/// Tokens whose type has no rule are handed to the fallback rule, which is registered under the
/// key `(unknown)`. The fallback is always present; it can be replaced but not removed.
pub struct Transformer<O> {
    rules: FxHashMap<String, Rule<O>>,
    fallback: Rule<O>,
}

impl<O> Transformer<O> {
    /// Creates a transformer with the given fallback rule and no other rules.
    pub fn new<F>(fallback: F) -> Self
    where
        F: Fn(&Token<'_>) -> O + Send + Sync + 'static,
    {
        Self {
            rules: FxHashMap::default(),
            fallback: Arc::new(fallback),
        }
    }

    /// Installs `rule` for all given token types, replacing existing rules.
    /// The key `(unknown)` replaces the fallback rule.
    pub fn add<K, F>(&mut self, keys: K, rule: F) -> &mut Self
    where
        K: RuleKeys,
        F: Fn(&Token<'_>) -> O + Send + Sync + 'static,
    {
        self.add_rule(keys, Arc::new(rule))
    }

    /// Installs an already shared rule for all given token types.
    pub fn add_rule<K: RuleKeys>(&mut self, keys: K, rule: Rule<O>) -> &mut Self {
        for key in keys.into_keys() {
            debug!("Adding rule for token type '{}'", key);
            if key == token::UNKNOWN {
                self.fallback = Arc::clone(&rule);
            } else {
                self.rules.insert(key, Arc::clone(&rule));
            }
        }
        self
    }

    /// Returns the rule that applies to `token_type`, the fallback if there is no specific one.
    pub fn rule(&self, token_type: &str) -> &Rule<O> {
        self.rules.get(token_type).unwrap_or(&self.fallback)
    }

    /// Returns the fallback rule.
    #[inline]
    pub fn fallback(&self) -> &Rule<O> {
        &self.fallback
    }

    /// Check if a specific rule exists for `token_type`.
    /// This is always true for `(unknown)`.
    pub fn has_rule(&self, token_type: &str) -> bool {
        token_type == token::UNKNOWN || self.rules.contains_key(token_type)
    }

    /// Applies the rule for the token's type.
    #[inline]
    pub fn transform(&self, token: &Token<'_>) -> O {
        (self.rule(token.token_type()))(token)
    }
}

impl<O: FromToken + 'static> Default for Transformer<O> {
    /// A transformer whose fallback is `O::from_token`.
    fn default() -> Self {
        Self::new(O::from_token)
    }
}

impl<O> Clone for Transformer<O> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            fallback: Arc::clone(&self.fallback),
        }
    }
}

impl<O> std::fmt::Debug for Transformer<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys = self.rules.keys().collect::<Vec<_>>();
        keys.sort();
        f.debug_struct("Transformer").field("rules", &keys).finish()
    }
}
