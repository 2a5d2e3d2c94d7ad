pub mod games;
pub mod saves;
