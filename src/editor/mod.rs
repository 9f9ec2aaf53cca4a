pub(crate) mod session;
pub(crate) mod state;
pub(crate) mod stickers;
