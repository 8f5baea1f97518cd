//*** START FILE: src/lib.rs ***//

// Declare all modules that are part of this library
pub mod config;
pub mod error;
pub mod types {
    pub mod study_data;
}
pub mod parsing {
    pub mod document;
    pub mod text_extractor;
}
pub mod synthesis;
pub mod profile;
pub mod profile_io;
pub mod study_session;
pub mod render;

pub use config::Config;
pub use error::{Result, StudyError};
pub use study_session::StudySession;

//*** END FILE: src/lib.rs ***//
