mod common;

mod test_capture_flee;
