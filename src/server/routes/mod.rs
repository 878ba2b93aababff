pub mod nurses;
