//! Grid container.

use std::collections::HashSet;
use std::sync::Arc;

use crate::backend::{Backend, NativeKind, Packing, PropValue, Property};
use crate::error::{Result, VeneerError};
use crate::widget::{Container, Widget, WidgetBase, attach_child, impl_widget};

/// Children arranged in rows and columns.
///
/// [`Container::add_widget`] fills cells left to right, top to bottom,
/// skipping occupied cells; [`add_widget_at`](GridBox::add_widget_at)
/// places a child explicitly.
#[derive(Clone)]
pub struct GridBox {
    base: Arc<WidgetBase>,
    columns: u32,
}

impl GridBox {
    /// Create a grid `columns` wide. Rows grow as needed.
    pub fn new(backend: &Backend, columns: u32) -> Self {
        Self {
            base: WidgetBase::new(backend, NativeKind::Grid, "GridBox"),
            columns: columns.max(1),
        }
    }

    /// Number of columns used for automatic placement.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Place a child at `(row, column)`, letting it grow into extra space
    /// if `stretch`. Fails with [`VeneerError::InvalidArgument`] if the cell
    /// is taken.
    pub fn add_widget_at<W: Widget + Clone>(&self, child: &W, row: u32, column: u32, stretch: bool) -> Result<()> {
        if self.occupied()?.contains(&(row, column)) {
            return Err(VeneerError::invalid_argument(
                format!("({row}, {column})"),
                "grid cell is already occupied",
            ));
        }
        attach_child(self, Arc::new(child.clone()), |child| {
            self.pack_at(child, row, column, stretch)
        })
    }

    /// The cell holding `child`, if it is packed here.
    pub fn cell_of(&self, child: &dyn Widget) -> Result<Option<(u32, u32)>> {
        self.base.ensure_alive()?;
        if !self.base.has_child(child.native_id()) {
            return Ok(None);
        }
        Ok(match self.base.backend().packing(child.native_id())? {
            Some(Packing::Cell { row, column, .. }) => Some((row, column)),
            _ => None,
        })
    }

    /// Set the gap between rows, in pixels.
    pub fn set_row_spacing(&self, pixels: u32) -> Result<()> {
        self.base.set(Property::RowSpacing, PropValue::Int(i64::from(pixels)))
    }

    /// Set the gap between columns, in pixels.
    pub fn set_column_spacing(&self, pixels: u32) -> Result<()> {
        self.base
            .set(Property::ColumnSpacing, PropValue::Int(i64::from(pixels)))
    }

    /// Set both gaps at once.
    pub fn set_spacing(&self, pixels: u32) -> Result<()> {
        self.set_row_spacing(pixels)?;
        self.set_column_spacing(pixels)
    }

    fn occupied(&self) -> Result<HashSet<(u32, u32)>> {
        self.base.ensure_alive()?;
        let backend = self.base.backend();
        let mut cells = HashSet::new();
        for child in backend.children(self.base.native_id())? {
            if let Some(Packing::Cell { row, column, .. }) = backend.packing(child)? {
                cells.insert((row, column));
            }
        }
        Ok(cells)
    }

    fn next_free(&self) -> Result<(u32, u32)> {
        let occupied = self.occupied()?;
        let mut row = 0;
        loop {
            if let Some(column) = (0..self.columns).find(|c| !occupied.contains(&(row, *c))) {
                return Ok((row, column));
            }
            row += 1;
        }
    }

    fn pack_at(&self, child: &Arc<dyn Widget>, row: u32, column: u32, expand: bool) -> Result<()> {
        self.base.backend().pack(
            self.base.native_id(),
            child.native_id(),
            Packing::Cell { row, column, expand },
        )?;
        Ok(())
    }
}

impl_widget!(GridBox, base);

impl Container for GridBox {
    fn pack_child(&self, child: &Arc<dyn Widget>) -> Result<()> {
        let (row, column) = self.next_free()?;
        self.pack_at(child, row, column, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::widget::widgets::{Button, Label};

    fn setup() -> Backend {
        Arc::new(HeadlessBackend::new())
    }

    #[test]
    fn test_auto_placement_fills_rows() {
        let backend = setup();
        let grid = GridBox::new(&backend, 2);
        let widgets: Vec<Button> = (0..5).map(|i| Button::new(&backend, &i.to_string())).collect();
        for w in &widgets {
            grid.add_widget(w).unwrap();
        }

        let cells: Vec<_> = widgets.iter().map(|w| grid.cell_of(w).unwrap().unwrap()).collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0)]);
    }

    #[test]
    fn test_explicit_cell_and_skip() {
        let backend = setup();
        let grid = GridBox::new(&backend, 2);
        let fixed = Label::new(&backend, "fixed");
        grid.add_widget_at(&fixed, 0, 0, true).unwrap();

        let auto = Button::new(&backend, "auto");
        grid.add_widget(&auto).unwrap();
        assert_eq!(grid.cell_of(&auto).unwrap(), Some((0, 1)));

        let clash = Button::new(&backend, "clash");
        assert!(matches!(
            grid.add_widget_at(&clash, 0, 1, false),
            Err(VeneerError::InvalidArgument { .. })
        ));
        assert!(clash.widget_base().parent().is_none());
    }

    #[test]
    fn test_removal_frees_cell() {
        let backend = setup();
        let grid = GridBox::new(&backend, 1);
        let a = Button::new(&backend, "a");
        let b = Button::new(&backend, "b");
        grid.add_widget(&a).unwrap();
        grid.add_widget(&b).unwrap();
        grid.remove(&a).unwrap();

        let c = Button::new(&backend, "c");
        grid.add_widget(&c).unwrap();
        assert_eq!(grid.cell_of(&c).unwrap(), Some((0, 0)));
        assert_eq!(grid.cell_of(&a).unwrap(), None);
    }
}
