/*!
 * Translation request handling.
 *
 * - `handler`: the request flow from raw text to a translation with provenance
 */

pub mod handler;

pub use handler::{Provenance, TranslationHandler, TranslationOutcome, CACHED_LANGUAGE};
