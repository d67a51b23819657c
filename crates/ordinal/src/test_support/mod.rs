pub(crate) mod cartoons;
pub(crate) mod memory;

pub(crate) use cartoons::{Cartoon, FunnyCartoon, bedrock};
pub(crate) use memory::MemorySource;
