pub mod cpu_bump_warper;
