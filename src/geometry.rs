pub mod lens;
