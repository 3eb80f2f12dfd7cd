mod line_output_tests;
