mod check;
mod generate;
mod helpers;
