pub(crate) mod randompartition;
