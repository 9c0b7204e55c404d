pub(crate) mod compositor;
pub(crate) mod model;
pub(crate) mod sampler;
