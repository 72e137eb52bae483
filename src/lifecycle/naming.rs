//! Physical index naming for a logical indice

use serde::{Deserialize, Serialize};

/// The two physical indices backing logical indice `N`: `N_1` and `N_2`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndicePair {
    indice: String,
    primary: String,
    secondary: String,
}

impl IndicePair {
    pub fn new(indice: impl Into<String>) -> Self {
        let indice = indice.into();
        Self {
            primary: format!("{}_1", indice),
            secondary: format!("{}_2", indice),
            indice,
        }
    }

    /// Logical name, also the alias name
    pub fn indice(&self) -> &str {
        &self.indice
    }

    /// `N_1`, the index the alias is first pinned to
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// `N_2`
    pub fn secondary(&self) -> &str {
        &self.secondary
    }

    pub fn members(&self) -> [String; 2] {
        [self.primary.clone(), self.secondary.clone()]
    }

    pub fn contains(&self, index: &str) -> bool {
        index == self.primary || index == self.secondary
    }

    /// The other member of the pair, or `None` if `index` is not a member
    pub fn sibling_of(&self, index: &str) -> Option<&str> {
        if index == self.primary {
            Some(&self.secondary)
        } else if index == self.secondary {
            Some(&self.primary)
        } else {
            None
        }
    }
}

/// Used / unused designation of a pair, derived from the alias
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasState {
    pub indice: String,
    /// Index currently behind the alias
    pub used: String,
    /// Its sibling, safe to modify destructively
    pub unused: String,
}

impl AliasState {
    /// State after a swap
    pub fn swapped(&self) -> Self {
        Self {
            indice: self.indice.clone(),
            used: self.unused.clone(),
            unused: self.used.clone(),
        }
    }
}
