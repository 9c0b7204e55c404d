pub(crate) mod check;
pub(crate) mod decode;
pub(crate) mod scale;
pub(crate) mod source;
