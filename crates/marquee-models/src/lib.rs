pub mod display_record;
pub mod genre;
pub mod media;
pub mod movie;
pub mod video;

pub use display_record::DisplayRecord;
pub use genre::Genre;
pub use media::MediaKind;
pub use movie::MovieDetails;
pub use video::{select_trailer, Video};
