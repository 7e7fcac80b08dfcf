pub mod bmp180;
