mod errors;
mod fragments;
mod stages;
