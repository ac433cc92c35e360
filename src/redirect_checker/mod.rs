mod checker;
mod normalize;
mod runner;

pub use checker::{CheckOptions, RedirectChecker, RedirectMode};
pub use normalize::{
    DEFAULT_WILDCARD_TOKEN, Normalization, destinations_match, normalize, substitute_wildcard,
};
pub use runner::{BatchRunner, DEFAULT_ESTIMATE_SAMPLE};
