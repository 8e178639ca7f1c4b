pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
#[cfg(test)]
pub(crate) mod mock;

pub use r#trait::KycAccountRepository;
