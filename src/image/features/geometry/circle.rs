use crate::image::features::geometry::offset::Offset;

// https://www.geeksforgeeks.org/bresenhams-circle-drawing-algorithm/?ref=rp
/// Offsets of a Bresenham circle, ordered counter clockwise by angle starting at (radius,0) and free of duplicates.
pub fn circle_bresenham(radius: usize) -> Vec<Offset> {

    let mut x: isize = 0;
    let mut y: isize = radius as isize;
    let mut d = 3 - 2*radius as isize;

    let mut offsets = bresenham_octant(x,y);
    while y >= x {
        x+=1;
        if d > 0 {
            y-=1;
            d = d + 4*(x-y) + 10;
        } else {
            d = d + 4*x + 6;
        }
        offsets.extend(bresenham_octant(x,y));
    }

    offsets.sort();
    offsets.dedup();
    offsets.sort_by(|a,b| normalized_angle(a).partial_cmp(&normalized_angle(b)).unwrap_or(std::cmp::Ordering::Equal));
    offsets
}

fn normalized_angle(offset: &Offset) -> crate::Float {
    match offset.angle() {
        angle if angle < 0.0 => angle + 2.0*crate::float::consts::PI,
        angle => angle
    }
}

fn bresenham_octant(x: isize, y: isize) -> Vec<Offset> {
    let mut points = Vec::<Offset>::with_capacity(8);
    for x_sign in [-1, 1] {
        for y_sign in [-1, 1] {
            let x_signed = x_sign*x;
            let y_signed = y_sign*y;

            points.push(Offset{x: x_signed,y: y_signed });
            points.push(Offset{x: y_signed,y: x_signed });
        }
    }

    points
}
