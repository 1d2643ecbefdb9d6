mod helpers;
mod unit;
