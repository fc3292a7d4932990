//! Token-macro expansion capability.
//!
//! Hosts inject their own templating engine through [`MacroExpander`]; a
//! closure with the right signature works too. [`TokenMacroExpander`] covers
//! the common `${NAME}` / `$NAME` case against [`BuildContext::variables`].

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::domain::BuildContext;
use crate::error::ExpansionError;

/// Expands macro tokens in a label template for a given build.
pub trait MacroExpander: Send + Sync {
    fn expand(&self, template: &str, build: &BuildContext) -> Result<String, ExpansionError>;
}

impl<F> MacroExpander for F
where
    F: Fn(&str, &BuildContext) -> Result<String, ExpansionError> + Send + Sync,
{
    fn expand(&self, template: &str, build: &BuildContext) -> Result<String, ExpansionError> {
        self(template, build)
    }
}

/// Returns every template unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityExpander;

impl MacroExpander for IdentityExpander {
    fn expand(&self, template: &str, _build: &BuildContext) -> Result<String, ExpansionError> {
        Ok(template.to_string())
    }
}

/// Substitutes `${NAME}` and `$NAME` with build variables; `$$` is a literal `$`.
#[derive(Debug, Clone, Copy)]
pub struct TokenMacroExpander {
    strict: bool,
}

impl Default for TokenMacroExpander {
    fn default() -> Self {
        Self::strict()
    }
}

impl TokenMacroExpander {
    /// Unknown variables are an error.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Unknown variables are left in place.
    pub fn lenient() -> Self {
        Self { strict: false }
    }
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\$|\$\{([^}]*)\}|\$\{|\$([A-Za-z_][A-Za-z0-9_]*)")
            .expect("token pattern is valid")
    })
}

fn is_token_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl TokenMacroExpander {
    fn substitute(
        &self,
        caps: &Captures<'_>,
        build: &BuildContext,
    ) -> Result<String, ExpansionError> {
        let Some(whole) = caps.get(0) else {
            return Ok(String::new());
        };
        let offset = whole.start();

        let name = match (caps.get(1), caps.get(2)) {
            (Some(braced), _) => {
                let name = braced.as_str().trim();
                if !is_token_name(name) {
                    return Err(ExpansionError::Malformed {
                        offset,
                        reason: format!("invalid token name '{}'", braced.as_str()),
                    });
                }
                name
            }
            (None, Some(bare)) => bare.as_str(),
            (None, None) if whole.as_str() == "$$" => return Ok("$".to_string()),
            (None, None) => {
                return Err(ExpansionError::Malformed {
                    offset,
                    reason: "unterminated '${'".to_string(),
                })
            }
        };

        match build.variables.get(name) {
            Some(value) => Ok(value.clone()),
            None if self.strict => Err(ExpansionError::UnknownToken {
                token: name.to_string(),
            }),
            None => Ok(whole.as_str().to_string()),
        }
    }
}

impl MacroExpander for TokenMacroExpander {
    fn expand(&self, template: &str, build: &BuildContext) -> Result<String, ExpansionError> {
        let mut out = String::with_capacity(template.len());
        let mut last = 0;

        for caps in token_pattern().captures_iter(template) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            out.push_str(&template[last..whole.start()]);
            out.push_str(&self.substitute(&caps, build)?);
            last = whole.end();
        }
        out.push_str(&template[last..]);

        Ok(out)
    }
}
