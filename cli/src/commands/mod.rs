mod category;
mod helpers;
mod recipe;
mod transfer;

pub(crate) use category::{
    cmd_category_add, cmd_category_assign, cmd_category_delete, cmd_category_list,
    cmd_category_rename, cmd_category_unassign,
};
pub(crate) use recipe::{RecipeArgs, cmd_add, cmd_delete, cmd_edit, cmd_fav, cmd_list, cmd_show};
pub(crate) use transfer::{cmd_export, cmd_import, cmd_seed};
