mod common;
mod dialogue;
mod lifecycle;
