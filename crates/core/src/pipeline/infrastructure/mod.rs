pub mod compose_worker;
