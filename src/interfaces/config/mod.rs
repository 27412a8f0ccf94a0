pub mod limits_file;
