pub mod cached_landmark_detector;
pub mod json_landmark_detector;
