mod challenge;

pub use challenge::Challenge;
