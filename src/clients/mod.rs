pub mod anilist;
pub mod consumet;
