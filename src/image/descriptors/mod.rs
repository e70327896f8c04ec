pub mod brief_descriptor;
