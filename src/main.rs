use grid_stack_search::{Point, SearchGrid};

fn main() {
    let grid = SearchGrid::from_rows(vec![
        vec![0, 1, 0, 0, 0],
        vec![0, 1, 0, 1, 0],
        vec![0, 0, 0, 1, 0],
        vec![0, 1, 1, 1, 0],
        vec![0, 0, 0, 0, 0],
    ])
    .unwrap();

    let path = grid
        .find_path(&Point::new(0, 0), &Point::new(4, 4))
        .unwrap();

    match path {
        Some(path) => {
            println!("Path found:");
            for point in path {
                println!("{point}");
            }
        }
        None => println!("No path found."),
    }
}
