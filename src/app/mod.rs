pub mod demo;
pub mod export;
pub mod pages;
pub mod render;
