pub mod app;
pub mod cli;
pub mod favorites;
pub mod pages;
pub mod render;
pub mod routes;
pub mod tmdb;
