pub mod channels;
pub mod voice;
