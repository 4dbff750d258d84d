pub mod pointer;

#[cfg(test)]
pub mod pointer_test;
