//! # torrentmate-parser
//!
//! Classifies a release folder as a movie or a series from its name and
//! listing, and extracts the title, year and season/episode marker.
//!
//! ## Quick Start
//!
//! ```
//! use torrentmate_parser::{Classifier, ContentType};
//!
//! let identity = Classifier::new().classify_name("Inception (2010)");
//! assert_eq!(identity.content_type(), ContentType::Movie);
//! assert_eq!(identity.title(), "Inception");
//! assert_eq!(identity.year(), Some(2010));
//!
//! let identity = Classifier::new().classify_name("Some.Show.S02E05.WEBRip");
//! assert_eq!(identity.content_type(), ContentType::Series);
//! assert_eq!(identity.title(), "Some Show");
//! assert_eq!(identity.episodes().unwrap().to_string(), "S02E05");
//! ```
//!
//! ## Precedence
//!
//! A parenthesized year beats a season marker by default. Use
//! [`Precedence::SeriesFirst`] to flip that:
//!
//! ```
//! use torrentmate_parser::{Classifier, ContentType, Precedence};
//!
//! let name = "Anthology (2019) S01E01";
//! assert_eq!(Classifier::new().classify_name(name).content_type(), ContentType::Movie);
//!
//! let series_first = Classifier::new().with_precedence(Precedence::SeriesFirst);
//! let identity = series_first.classify_name(name);
//! assert_eq!(identity.content_type(), ContentType::Series);
//! assert_eq!(identity.year(), Some(2019));
//! ```

mod classifier;
pub mod model;
mod patterns;
pub mod title;

pub use classifier::{Classifier, Precedence};
pub use model::{ContentIdentity, ContentType, EpisodeMarker, NumberRange};
pub use title::normalize_title;
