mod ast_nodes_tests;
