mod test_range_basic;
mod test_transform_bounds_basic;
