pub mod link;
pub mod movement;
pub mod node;
pub mod road_link;
pub mod vehicle_class_group;
pub mod vehicle_type;
