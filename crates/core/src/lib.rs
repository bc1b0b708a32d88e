pub mod shared {
    pub mod constants;
    pub mod geometry;
    pub mod photo;
}

pub mod landmarks {
    pub mod domain {
        pub mod face;
        pub mod feature_group;
        pub mod landmark_detector;
    }
    pub mod infrastructure;
}

pub mod warping {
    pub mod domain {
        pub mod radial_warper;
        pub mod warp_target;
    }
    pub mod infrastructure;
}

pub mod imaging {
    pub mod domain {
        pub mod photo_reader;
        pub mod photo_writer;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod compose_error;
    pub mod feature_scales;
    pub mod pipeline_logger;
    pub mod warp_compositor;
    pub mod warp_photo_use_case;
    pub mod infrastructure;
}
