#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod block;
mod digest;
mod engine;
mod error;
mod rounds;

pub use block::PaddedMessage;
pub use digest::Md5Digest;
pub use engine::{Md5, digest};
pub use error::ParseDigestError;
