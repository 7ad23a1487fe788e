use std::{path::Path, rc::Rc};

use mlua::prelude::*;

use crate::{
    mazecore::{AlgorithmKind, Cell, Maze},
    method::MethodKind,
    settings::Settings,
    Coordinator,
};

/// Maze handed out to Lua scripts.
pub struct LuaMaze(pub Maze);

fn cell_table(lua: &Lua, cell: Cell) -> LuaResult<LuaTable> {
    let table = lua.create_table()?;
    table.set("row", cell.row)?;
    table.set("col", cell.col)?;
    Ok(table)
}

fn cell_list<'l>(lua: &'l Lua, cells: &[Cell]) -> LuaResult<Vec<LuaTable<'l>>> {
    cells.iter().map(|&cell| cell_table(lua, cell)).collect()
}

impl LuaUserData for LuaMaze {
    fn add_fields<'lua, F: LuaUserDataFields<'lua, Self>>(fields: &mut F) {
        fields.add_field_method_get("width", |_, this| Ok(this.0.width()));
        fields.add_field_method_get("height", |_, this| Ok(this.0.height()));
        fields.add_field_method_get("status", |_, this| Ok(this.0.status().to_string()));
        fields.add_field_method_get("entrance", |lua, this| cell_table(lua, this.0.entrance()));
        fields.add_field_method_get("exit", |lua, this| cell_table(lua, this.0.exit()));
        fields.add_field_method_get("path", |lua, this| cell_list(lua, this.0.path()));
        fields.add_field_method_get("visited", |lua, this| {
            let visited = this.0.solution().map(|s| s.visited.as_slice());
            cell_list(lua, visited.unwrap_or_default())
        });
    }
}

fn algorithm(kind: Option<String>, fallback: AlgorithmKind) -> LuaResult<AlgorithmKind> {
    match kind {
        Some(name) => name.parse().map_err(LuaError::external),
        None => Ok(fallback),
    }
}

fn method(kind: Option<String>) -> LuaResult<Option<MethodKind>> {
    kind.map(|name| name.parse().map_err(LuaError::external))
        .transpose()
}

/// Installs the global `mazelib` table, using default settings.
pub fn register(lua: &Lua) -> LuaResult<()> {
    register_with(lua, Coordinator::new(Settings::default()))
}

pub fn register_with(lua: &Lua, coordinator: Coordinator) -> LuaResult<()> {
    let coordinator = Rc::new(coordinator);
    let module = lua.create_table()?;

    let co = Rc::clone(&coordinator);
    module.set(
        "generate",
        lua.create_function(
            move |_, (width, height, seed, kind): (usize, usize, Option<u64>, Option<String>)| {
                let kind = algorithm(kind, co.settings().get_default_generator())?;
                let maze = co
                    .generate(width, height, seed, kind)
                    .map_err(LuaError::external)?;
                Ok(LuaMaze(maze))
            },
        )?,
    )?;

    let co = Rc::clone(&coordinator);
    module.set(
        "solve",
        lua.create_function(move |_, (maze, kind): (LuaAnyUserData, Option<String>)| {
            let kind = algorithm(kind, co.settings().get_default_solver())?;
            let mut maze = maze.borrow_mut::<LuaMaze>()?;
            let solution = co.solve(&mut maze.0, kind).map_err(LuaError::external)?;
            Ok(solution.is_found())
        })?,
    )?;

    let co = Rc::clone(&coordinator);
    module.set(
        "save",
        lua.create_function(
            move |_, (maze, path, kind): (LuaAnyUserData, String, Option<String>)| {
                let maze = maze.borrow::<LuaMaze>()?;
                co.save(&maze.0, Path::new(&path), method(kind)?)
                    .map_err(LuaError::external)
            },
        )?,
    )?;

    let co = Rc::clone(&coordinator);
    module.set(
        "load",
        lua.create_function(move |_, (path, kind): (String, Option<String>)| {
            let maze = co
                .load(Path::new(&path), method(kind)?)
                .map_err(LuaError::external)?;
            Ok(LuaMaze(maze))
        })?,
    )?;

    module.set(
        "algorithms",
        lua.create_function(|lua, ()| {
            AlgorithmKind::ALL
                .into_iter()
                .map(|kind| {
                    let entry = lua.create_table()?;
                    entry.set("name", kind.name())?;
                    entry.set("alias", kind.alias())?;
                    entry.set("role", kind.role().to_string())?;
                    Ok(entry)
                })
                .collect::<LuaResult<Vec<_>>>()
        })?,
    )?;

    lua.globals().set("mazelib", module)
}
