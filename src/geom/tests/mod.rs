mod test_matrix_basic;
mod test_transform_basic;
