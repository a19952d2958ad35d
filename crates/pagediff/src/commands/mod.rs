mod image;
mod pdf;

pub use self::image::{ImageRun, image};
pub use self::pdf::{PdfRun, pdf};
