mod helpers;
mod test_data;
