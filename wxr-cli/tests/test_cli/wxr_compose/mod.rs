mod edge_cases;
